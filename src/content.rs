use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::models::{
    Asset, ContactLink, Heading, Highlight, LinkKind, Portfolio, Profile, Project, Section, Skill,
    SkillCategory,
};

/// The portfolio shipped with the binary.
pub static BUILTIN: Lazy<Portfolio> = Lazy::new(builtin_portfolio);

fn section(id: &str, label: &str) -> Section {
    Section { id: id.into(), label: label.into() }
}

fn category(key: &str, name: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        key: key.into(),
        name: name.into(),
        skills: skills.iter().map(|s| Skill { name: (*s).into() }).collect(),
    }
}

fn heading(plain: &str, accent: &str, subtitle: &str) -> Heading {
    Heading { plain: plain.into(), accent: accent.into(), subtitle: subtitle.into() }
}

fn builtin_portfolio() -> Portfolio {
    Portfolio {
        brand: "Portfolio".into(),
        profile: Profile {
            name: "Danilo Vaz".into(),
            greeting: "Olá, eu sou".into(),
            tagline: "Desenvolvedor Full Stack apaixonado por criar experiências digitais incríveis e soluções inovadoras que fazem a diferença.".into(),
            about: vec![
                "Sou formado como Técnico em Desenvolvimento de Sistemas, e atualmente, sou estudante do 4° período de Análise e Desenvolvimento de Sistemas pela Fatec Rubens Lara, em Santos-SP.".into(),
                "Entusiasta de React, Node.js e tecnologias modernas, sempre busco aprender novas ferramentas e metodologias para entregar soluções de alta qualidade.".into(),
            ],
            highlights: ["Clean Code", "UI/UX Design", "Web Performance"]
                .iter()
                .map(|t| Highlight { text: (*t).into() })
                .collect(),
            card_title: "Desenvolvedor Freelancer".into(),
            card_text: "Trabalhando como freelancer, desenvolvendo soluções personalizadas para diversos clientes, desde pequenos negócios até empresas estabelecidas.".into(),
            photo: "assets/eu.jpg".into(),
            hero_image: "assets/hero-bg.jpg".into(),
        },
        sections: vec![
            section("hero", "Início"),
            section("about", "Sobre"),
            section("skills", "Skills"),
            section("projects", "Projetos"),
            section("contact", "Contato"),
        ],
        about_heading: heading("Sobre", "Mim", "Conheça um pouco da minha jornada e paixão pela tecnologia"),
        skills_heading: heading("Minhas", "Skills", "Tecnologias e ferramentas que domino para criar soluções incríveis"),
        projects_heading: heading("Meus", "Projetos", "Alguns dos projetos que desenvolvi recentemente"),
        contact_heading: heading("Vamos", "Conversar", "Tem uma ideia incrível? Vamos transformá-la em realidade juntos!"),
        contact_title: "Entre em Contato".into(),
        default_skill_category: "frontend".into(),
        skill_categories: vec![
            category("frontend", "Front-end", &["React", "HTML", "CSS", "Tailwind", "HeroUI", "JavaScript"]),
            category("backend", "Back-end", &["Node.js", "JavaScript", "Java"]),
            category("database", "Banco de Dados", &["MySQL", "SQL Server", "MongoDB"]),
            category("tools", "Ferramentas", &["Git", "Docker", "VS Code", "Figma"]),
        ],
        projects: vec![Project {
            title: "Clinica Leutz".into(),
            description: "Um site desenvolvido para gerenciar dados de clientes, orçamentos e procedimento para a Clínica Leutz".into(),
            technologies: ["React", "Node.js", "MySQL", "Tailwind", "HeroUI"].iter().map(|t| (*t).into()).collect(),
            image: "assets/ClinicaLeutz.jpg".into(),
        }],
        contact_links: vec![
            ContactLink {
                kind: LinkKind::Email,
                label: "danilovaz06dv@gmail.com".into(),
                href: "mailto:danilovaz06dv@gmail.com".into(),
            },
            ContactLink {
                kind: LinkKind::Linkedin,
                label: "/in/danilo-vaz-3442bb2b0".into(),
                href: "https://www.linkedin.com/in/danilo-vaz-3442bb2b0".into(),
            },
            ContactLink {
                kind: LinkKind::Github,
                label: "/danilovaz7".into(),
                href: "https://github.com/danilovaz7".into(),
            },
        ],
        cv: Asset {
            path: "assets/curriculoDan2025.pdf".into(),
            suggested_name: "Danilo_Vaz_CV.pdf".into(),
        },
        footer: "Portfolio. Danilo Vaz.".into(),
        footer_year: Some(2024),
    }
}

/// Loads the portfolio from `path`, or returns the built-in one.
pub fn load(path: Option<&str>) -> Result<Portfolio> {
    let Some(raw) = path else {
        debug!("using built-in portfolio content");
        return Ok(BUILTIN.clone());
    };
    let expanded = shellexpand::tilde(raw).into_owned();
    let text = fs::read_to_string(&expanded)
        .with_context(|| format!("failed to read content file {}", expanded))?;
    let mut portfolio = parse(&text).with_context(|| format!("invalid content file {}", expanded))?;
    if let Some(base) = Path::new(&expanded).parent() {
        rebase_assets(&mut portfolio, base);
    }
    info!(path = %expanded, sections = portfolio.sections.len(), "loaded portfolio content");
    Ok(portfolio)
}

/// Parses and validates a TOML content document.
pub fn parse(text: &str) -> Result<Portfolio> {
    let mut portfolio: Portfolio = toml::from_str(text)?;
    validate(&mut portfolio)?;
    Ok(portfolio)
}

fn validate(portfolio: &mut Portfolio) -> Result<()> {
    if portfolio.sections.is_empty() {
        bail!("at least one section is required");
    }
    for (i, s) in portfolio.sections.iter().enumerate() {
        if portfolio.sections[..i].iter().any(|other| other.id == s.id) {
            bail!("duplicate section id `{}`", s.id);
        }
    }
    if !portfolio
        .skill_categories
        .iter()
        .any(|c| c.key == portfolio.default_skill_category)
    {
        bail!("default skill category `{}` is not defined", portfolio.default_skill_category);
    }
    // technologies behave as a set; keep first occurrence order
    for project in &mut portfolio.projects {
        let mut seen = Vec::with_capacity(project.technologies.len());
        project.technologies.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(t.clone());
                true
            }
        });
    }
    Ok(())
}

// Relative asset paths in a content file point next to that file.
fn rebase_assets(portfolio: &mut Portfolio, base: &Path) {
    let rebase = |p: &mut String| {
        if !p.is_empty() && Path::new(p.as_str()).is_relative() {
            *p = base.join(p.as_str()).to_string_lossy().into_owned();
        }
    };
    rebase(&mut portfolio.cv.path);
    rebase(&mut portfolio.profile.photo);
    rebase(&mut portfolio.profile.hero_image);
    for project in &mut portfolio.projects {
        rebase(&mut project.image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_sections_in_order() {
        let ids: Vec<&str> = BUILTIN.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["hero", "about", "skills", "projects", "contact"]);
    }

    #[test]
    fn builtin_round_trips_through_toml() {
        let text = toml::to_string(&*BUILTIN).unwrap();
        let parsed = parse(&text).unwrap();
        assert_eq!(parsed, *BUILTIN);
    }

    #[test]
    fn rejects_unknown_default_category() {
        let mut p = BUILTIN.clone();
        p.default_skill_category = "cooking".into();
        let err = parse(&toml::to_string(&p).unwrap()).unwrap_err();
        assert!(err.to_string().contains("cooking"));
    }

    #[test]
    fn rejects_duplicate_section_ids() {
        let mut p = BUILTIN.clone();
        p.sections[1].id = "hero".into();
        assert!(parse(&toml::to_string(&p).unwrap()).is_err());
    }

    #[test]
    fn deduplicates_project_technologies() {
        let mut p = BUILTIN.clone();
        p.projects[0].technologies = vec!["React".into(), "MySQL".into(), "React".into()];
        let parsed = parse(&toml::to_string(&p).unwrap()).unwrap();
        assert_eq!(parsed.projects[0].technologies, ["React", "MySQL"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load(Some("/nonexistent/folio/content.toml")).is_err());
    }
}
