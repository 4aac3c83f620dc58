// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http_session::{Cookie, CookieJar};
use url::Url;

fn set_cookie_parsing_benchmark(c: &mut Criterion) {
    let origin = Url::parse("https://www.example.com/account/login").unwrap();
    let headers = vec![
        "sid=abc123; Path=/; Secure; HttpOnly",
        "pref=dark; Domain=.example.com; Max-Age=3600",
        "tracking=1; Expires=Wed, 21 Oct 2099 07:28:00 GMT; SameSite=Lax",
        "bad; Domain=evil.com",
    ];

    c.bench_function("parse_set_cookie", |b| {
        b.iter(|| {
            for header in &headers {
                black_box(Cookie::parse(header, &origin));
            }
        })
    });
}

fn cookie_header_benchmark(c: &mut Criterion) {
    let jar = CookieJar::new();
    let origin = Url::parse("https://www.example.com/").unwrap();
    for i in 0..200 {
        jar.add_from_header(&format!("c{}=v{}; Path=/section{}", i, i, i % 10), &origin);
    }
    jar.add_from_header("sid=abc123; Domain=example.com", &origin);

    let target = Url::parse("https://www.example.com/section3/page").unwrap();
    c.bench_function("cookie_header_lookup", |b| {
        b.iter(|| black_box(jar.get_cookie_header(&target)))
    });
}

criterion_group!(benches, set_cookie_parsing_benchmark, cookie_header_benchmark);
criterion_main!(benches);
