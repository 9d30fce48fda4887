pub mod certificate;
pub mod project;
pub mod user;

pub use certificate::Entity as CertificateEntity;
pub use project::Entity as ProjectEntity;
pub use user::Entity as UserEntity;
