mod cache_tests;
mod portfolio_tests;
mod rotation_tests;
