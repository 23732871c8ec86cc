mod export_tests;
mod render_tests;
