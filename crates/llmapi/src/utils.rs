use base64::Engine as _;

pub fn encode_byte_to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_encode_with_padding() {
        assert_eq!(encode_byte_to_base64(&[0xff, 0xd8, 0xff]), "/9j/");
        assert_eq!(encode_byte_to_base64(b"ab"), "YWI=");
    }
}
