use crate::models::ImageUrlOptions;

pub const UPLOAD_PATH: &str = "/upload-image";
pub const RANDOM_PATH: &str = "/random";

/// `base_url + path`, followed by `?api_key=<key>` when a key is configured.
pub fn endpoint(base_url: &str, api_key: Option<&str>, path: &str) -> String {
    let mut url = format!("{}{}", base_url, path);
    if let Some(key) = api_key {
        url.push_str("?api_key=");
        url.push_str(key);
    }
    url
}

/// Appends the non-default options as `&k=v` pairs.
///
/// The joiner is always `&`, even when `url` carries no query yet.
pub fn with_options(mut url: String, options: Option<&ImageUrlOptions>) -> String {
    let pairs = options.map(ImageUrlOptions::query_pairs).unwrap_or_default();
    if pairs.is_empty() {
        return url;
    }

    let encoded: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    url.push('&');
    url.push_str(&encoded.join("&"));
    url
}

pub fn image_url(
    base_url: &str,
    api_key: Option<&str>,
    image_id: &str,
    options: Option<&ImageUrlOptions>,
) -> String {
    with_options(
        endpoint(base_url, api_key, &format!("/{}", image_id)),
        options,
    )
}

pub fn random_image_url(
    base_url: &str,
    api_key: Option<&str>,
    options: Option<&ImageUrlOptions>,
) -> String {
    with_options(endpoint(base_url, api_key, RANDOM_PATH), options)
}
