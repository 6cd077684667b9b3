//! Test steps: page actions plus the assertions a test case expects

mod home;

pub use home::HomeSteps;
