use crate::state::FormKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitProcess { url: String },
    SubmitResearch { tld: String, questions: Vec<String> },
    OpenProgressStream { form: FormKind },
    CloseProgressStream { form: FormKind },
}
