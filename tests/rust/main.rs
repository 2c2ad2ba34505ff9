
mod api_tests;
mod ranking_tests;
mod sql_tests;
