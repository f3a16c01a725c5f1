use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusArea {
    Page,
    Form,
    Links,
}

/// One page region, addressed by a stable id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Skill {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkillCategory {
    pub key: String,
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Email,
    Linkedin,
    Github,
}

impl LinkKind {
    pub fn glyph(self) -> &'static str {
        match self {
            LinkKind::Email => "✉",
            LinkKind::Linkedin => "in",
            LinkKind::Github => "gh",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactLink {
    pub kind: LinkKind,
    pub label: String,
    pub href: String,
}

/// A static file the page points at, with the name it should be saved under.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Asset {
    pub path: String,
    pub suggested_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Highlight {
    pub text: String,
}

/// Section title rendered as `plain` followed by an accented `accent` word.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Heading {
    pub plain: String,
    pub accent: String,
    pub subtitle: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    pub greeting: String,
    pub tagline: String,
    pub about: Vec<String>,
    pub highlights: Vec<Highlight>,
    pub card_title: String,
    pub card_text: String,
    pub photo: String,
    pub hero_image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Portfolio {
    pub brand: String,
    pub profile: Profile,
    pub sections: Vec<Section>,
    pub about_heading: Heading,
    pub skills_heading: Heading,
    pub projects_heading: Heading,
    pub contact_heading: Heading,
    pub contact_title: String,
    pub default_skill_category: String,
    pub skill_categories: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub contact_links: Vec<ContactLink>,
    pub cv: Asset,
    pub footer: String,
    pub footer_year: Option<i32>,
}

impl Portfolio {
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}
