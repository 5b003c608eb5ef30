mod context_tests;
mod display_tests;
