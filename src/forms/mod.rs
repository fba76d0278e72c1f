pub mod product;
pub mod register;

pub use product::{PhotoUpload, ProductForm};
pub use register::{LoginForm, RegisterForm};

/// Per-field validation failures, surfaced back onto the rendered form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(&'static str, String)>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn field(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }
}
