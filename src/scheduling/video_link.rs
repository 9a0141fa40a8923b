//! Meeting link generation for new bookings.

use uuid::Uuid;

const GROUPS: [usize; 3] = [3, 4, 3];

/// Generates a meeting link of the form `{base}/xxx-yyyy-zzz`.
///
/// The code is ten random lowercase letters taken from a v4 UUID.
///
/// # Example
///
/// ```
/// use practice_engine::scheduling::generate_video_link;
///
/// let link = generate_video_link("https://meet.google.com");
/// let code = link.strip_prefix("https://meet.google.com/").unwrap();
/// assert_eq!(code.len(), 12);
/// assert_eq!(code.matches('-').count(), 2);
/// ```
pub fn generate_video_link(base_url: &str) -> String {
    let uuid = Uuid::new_v4();
    // Bytes 6 and 8 carry the version and variant bits.
    let mut letters = uuid
        .as_bytes()
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != 6 && *index != 8)
        .map(|(_, byte)| char::from(b'a' + byte % 26));

    let code = GROUPS
        .iter()
        .map(|len| letters.by_ref().take(*len).collect::<String>())
        .collect::<Vec<_>>()
        .join("-");

    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
