mod decode_fuzz_tests;
mod decode_tests;
mod format_tests;
