use std::borrow::Cow;

/// Text view of a byte string from the map, replacing invalid UTF-8.
pub fn lossy_str(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Escapes form feeds, which map titles use as color codes, as `\f`.
pub fn escape_form_feeds(text: &str) -> Cow<'_, str> {
    if text.contains('\x0c') {
        Cow::Owned(text.replace('\x0c', "\\f"))
    } else {
        Cow::Borrowed(text)
    }
}
