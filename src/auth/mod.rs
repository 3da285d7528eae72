pub mod authenticated_user;
pub mod claim;
pub mod password;

pub const REQUIRED_FIELDS: &str = "Username and password are required.";
