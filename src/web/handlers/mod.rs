//! HTML and form handlers for the login flow.

mod access_denied;
mod authenticate;
mod home;
mod login;
mod logout;

pub use access_denied::access_denied_response;
pub use authenticate::{LoginForm, authenticate_handler};
pub use home::home_handler;
pub use login::{LoginPageParams, login_handler};
pub use logout::logout_handler;
