use tracing::debug;

pub struct FormField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub rows: u16,
}

pub const FIELDS: [FormField; 3] = [
    FormField { label: "Nome", placeholder: "Seu nome", rows: 1 },
    FormField { label: "Email", placeholder: "seu@email.com", rows: 1 },
    FormField { label: "Mensagem", placeholder: "Sua mensagem...", rows: 4 },
];

pub const SUBMIT_LABEL: &str = "Enviar Mensagem";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent and nothing navigated.
    Suppressed,
}

/// Display-only contact form. Focus can move between the fields and the
/// submit button, but no input is captured.
#[derive(Default)]
pub struct ContactForm {
    focused: usize,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index into [`FIELDS`], or `FIELDS.len()` for the submit button.
    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn submit_focused(&self) -> bool {
        self.focused == FIELDS.len()
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % (FIELDS.len() + 1);
    }

    pub fn focus_previous(&mut self) {
        self.focused = (self.focused + FIELDS.len()) % (FIELDS.len() + 1);
    }

    pub fn submit(&self) -> SubmitOutcome {
        debug!("contact form submit suppressed");
        SubmitOutcome::Suppressed
    }
}
