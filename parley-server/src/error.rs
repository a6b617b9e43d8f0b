use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// The name is already registered; the caller must retry with another.
    #[error("username already taken")]
    NameTaken,
}
