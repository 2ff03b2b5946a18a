use axum::http::HeaderValue;
use color_eyre::Result;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue> {
    let cookie = if secure {
        format!("{name}={value}; HttpOnly; Max-Age=3600; Secure; Path=/; SameSite=Strict")
    } else {
        format!("{name}={value}; HttpOnly; Max-Age=3600; Path=/; SameSite=Strict")
    };
    Ok(cookie.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_the_secure_attribute_only_when_asked() {
        let secure = cookie("lang", "ar", true).unwrap();
        assert!(secure.to_str().unwrap().contains("Secure"));

        let plain = cookie("lang", "ar", false).unwrap();
        assert!(!plain.to_str().unwrap().contains("Secure"));
        assert!(plain.to_str().unwrap().starts_with("lang=ar; HttpOnly"));
    }
}
