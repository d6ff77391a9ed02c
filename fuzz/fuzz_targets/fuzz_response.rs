// Copyright 2026 BadCompany
// Licensed under the Apache License, Version 2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use lightrpc::{HttpResponse, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

fuzz_target!(|data: &[u8]| {
    // Response parsing must absorb any body without panicking.
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let response = Response::from_http(HttpResponse::new(200, headers, data.to_vec()));

    let _ = response.is_error();
    let _ = response.to_json();
});
