use chrono::Datelike;

/// Shown when a book has no cover.
pub const PLACEHOLDER_COVER: &str = "/no-image.png";

/// Full URL of a book cover. Image paths from the API are relative to the
/// asset origin.
pub fn cover_url(asset_base_url: &str, image_url: Option<&str>) -> String {
    match image_url {
        Some(path) if !path.is_empty() => {
            format!("{}{}", asset_base_url.trim_end_matches('/'), path)
        }
        _ => PLACEHOLDER_COVER.to_string(),
    }
}

/// Value for a date input: the part of an ISO date before the time.
pub fn date_input_value(publication_date: &str) -> &str {
    publication_date
        .split('T')
        .next()
        .unwrap_or(publication_date)
}

/// `M/D/YYYY`, falling back to the raw value when it is not a date.
pub fn display_date(publication_date: &str) -> String {
    match chrono::NaiveDate::parse_from_str(date_input_value(publication_date), "%Y-%m-%d") {
        Ok(day) => format!("{}/{}/{}", day.month(), day.day(), day.year()),
        Err(_) => publication_date.to_string(),
    }
}

pub fn guess_image_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
