mod aggregate;
mod amount;
mod expense;
mod month;
mod user;

pub use aggregate::*;
pub use amount::*;
pub use expense::*;
pub use month::*;
pub use user::*;
