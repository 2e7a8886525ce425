use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use reqwest::{
    Url,
    cookie::Jar,
    header::{HeaderMap, HeaderName, HeaderValue},
};

// the catalog serves partial pages without these
pub const HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("cache-control", "max-age=0"),
    ("dnt", "1"),
    ("priority", "u=0, i"),
    (
        "sec-ch-ua",
        r#""Google Chrome";v="137", "Chromium";v="137", "Not/A)Brand";v="24""#,
    ),
    ("sec-ch-ua-mobile", "?1"),
    ("sec-ch-ua-platform", r#""Android""#),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
];

pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Mobile Safari/537.36";

// scoped to the catalog host; image hosts only see the referer
pub const COOKIES: &[(&str, &str)] = &[
    ("theme", "mdark"),
    ("tfv", "1750232773570"),
    (
        "Hm_lvt_a7025e25c8500c732b8f48cc46e21467",
        "1750273651,1750275977,1750299608,1750311668",
    ),
    ("Hm_lpvt_a7025e25c8500c732b8f48cc46e21467", "1750311668"),
    ("HMACCOUNT", "A6016F638E220909"),
    ("wd", "553x1087"),
];

pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    for &(name, value) in HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    headers
}

/// Client carrying the fixed header and cookie profile for `base_url`
pub fn build_client(
    base_url: &str,
    connect_timeout: Duration,
) -> Result<reqwest::Client, anyhow::Error> {
    let url = Url::parse(base_url).map_err(|e| anyhow!("invalid base url {base_url}: {e}"))?;

    let jar = Jar::default();
    for (name, value) in COOKIES {
        jar.add_cookie_str(&format!("{name}={value}"), &url);
    }

    let client = reqwest::ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(default_headers())
        .cookie_provider(Arc::new(jar))
        .connect_timeout(connect_timeout)
        .brotli(true)
        .deflate(true)
        .gzip(true)
        .build()?;

    Ok(client)
}
