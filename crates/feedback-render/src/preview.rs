use feedback_core::models::attachment::Attachment;

/// Build the `src` value for an inline image preview.
///
/// Returns `None` unless the attachment is an image with a well-formed
/// base64 payload, so the result is safe to emit into an HTML attribute
/// without escaping. Accepts a bare payload or a complete `data:` URI
/// (parameters before `;base64` are allowed and dropped). Line breaks in
/// the payload are removed and the URL-safe alphabet is mapped to the
/// standard one, so the result is always `data:{mime};base64,{payload}`.
pub fn image_src(attachment: &Attachment) -> Option<String> {
    if !attachment.is_image() {
        return None;
    }
    let data = attachment.file_data.as_deref()?.trim();

    let (mime, payload) = match data.strip_prefix("data:") {
        Some(uri) => {
            let (meta, payload) = uri.split_once(',')?;
            let params = meta.strip_suffix(";base64")?;
            let mime = params.split(';').next()?;
            (mime, payload)
        }
        None => (attachment.mime_type.as_str(), data),
    };

    if !is_image_mime(mime) {
        return None;
    }
    let payload = normalize_base64(payload)?;
    Some(format!("data:{mime};base64,{payload}"))
}

fn is_image_mime(mime: &str) -> bool {
    mime.strip_prefix("image/").is_some_and(|subtype| {
        !subtype.is_empty()
            && subtype
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
    })
}

/// Strip ASCII whitespace and map `-`/`_` to `+`/`/`. `None` if anything
/// outside the base64 alphabets remains, or nothing remains at all.
fn normalize_base64(payload: &str) -> Option<String> {
    let mut out = String::with_capacity(payload.len());
    for b in payload.bytes() {
        match b {
            b if b.is_ascii_whitespace() => {}
            b'-' => out.push('+'),
            b'_' => out.push('/'),
            b if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=') => out.push(char::from(b)),
            _ => return None,
        }
    }
    (!out.is_empty()).then_some(out)
}
