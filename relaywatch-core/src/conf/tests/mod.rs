mod loader_tests;
mod normalize_tests;
