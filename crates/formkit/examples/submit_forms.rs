//! Example: Build requests for a set of sample forms
//!
//! Run with: cargo run -p formkit --example submit_forms
//!
//! This example shows how different forms map onto HTTP requests.

use formkit::{form_to_request_with_options, FormData, HtmlDocument, Request, SubmitOptions};
use url::Url;

/// Sample form definition
struct Sample {
    description: &'static str,
    html: &'static str,
    data: &'static [(&'static str, Option<&'static str>)],
    expect_method: &'static str,
    expect_url: &'static str,
}

/// Define samples here
const SAMPLES: &[Sample] = &[
    Sample {
        description: "Search box",
        html: r#"<form action="/search"><input name="q"><button>Search</button></form>"#,
        data: &[("q", Some("html forms"))],
        expect_method: "GET",
        expect_url: "https://example.com/search?q=html+forms",
    },
    Sample {
        description: "Login form",
        html: r#"<form method="post" action="/login">
            <input name="user"><input type="password" name="pass">
            <input type="hidden" name="csrf" value="t0k3n">
            <input type="submit" name="login" value="Log in"></form>"#,
        data: &[("user", Some("ann")), ("pass", Some("secret"))],
        expect_method: "POST",
        expect_url: "https://example.com/login",
    },
    Sample {
        description: "Feedback form with a field removed",
        html: r#"<form method="post" enctype="text/plain" action="/feedback">
            <textarea name="comment">Great!</textarea>
            <input type="hidden" name="tracking" value="abc"></form>"#,
        data: &[("tracking", None)],
        expect_method: "POST",
        expect_url: "https://example.com/feedback",
    },
];

fn main() {
    println!("FormKit Examples");
    println!("================\n");

    let base_url = Url::parse("https://example.com/").expect("valid base URL");
    let mut passed = 0;
    let mut failed = 0;

    for (i, sample) in SAMPLES.iter().enumerate() {
        println!("{}. {}", i + 1, sample.description);

        let doc = HtmlDocument::parse(sample.html, Some(base_url.clone()));
        let Some(form) = doc.forms().into_iter().next() else {
            println!("   No form found\n");
            failed += 1;
            continue;
        };

        let data: FormData = sample.data.iter().copied().collect();
        match form_to_request_with_options(&form, &SubmitOptions::new().data(data)) {
            Ok(request) => {
                print_request_summary(&request);
                if request.method.as_str() == sample.expect_method
                    && request.url.as_str() == sample.expect_url
                {
                    println!("   ✓ PASS\n");
                    passed += 1;
                } else {
                    println!("   ✗ FAIL (expected {} {})\n", sample.expect_method, sample.expect_url);
                    failed += 1;
                }
            }
            Err(e) => {
                println!("   Error: {}", e);
                println!("   ✗ FAIL\n");
                failed += 1;
            }
        }
    }

    println!("================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_request_summary(request: &Request) {
    println!("   {} {}", request.method, request.url);
    for (name, value) in &request.headers {
        println!("   {}: {}", name, value);
    }
    if !request.body.is_empty() {
        println!("   Body: {}", String::from_utf8_lossy(&request.body).replace('\n', "\\n"));
    }
}
