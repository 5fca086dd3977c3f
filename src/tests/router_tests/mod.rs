mod explore_tests;
mod house_form_tests;
