pub mod ethereum;

/// Marker for a chain protocol a transport can speak.
pub trait Protocol {
    const PROTOCOL: &'static str;
}
