//! Tests for region extraction and nine-patch encoding

mod extract_tests;
