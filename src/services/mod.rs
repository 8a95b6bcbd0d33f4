//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories. They own
//! validation, authorization and token handling; handlers translate their
//! results into responses.

pub mod job;
pub mod password;
pub mod policy;
pub mod token;
pub mod user;

pub use job::{JobService, JobServiceError};
pub use token::{Claims, TokenError, TokenIssuer};
pub use user::{LoginOutcome, UserService, UserServiceError};
