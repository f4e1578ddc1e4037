pub mod loan;
pub mod session;
