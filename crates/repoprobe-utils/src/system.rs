/// Retrieves the machine architecture as rpm names it (e.g. `x86_64`, `i686`).
pub fn arch() -> String {
    std::env::consts::ARCH.to_string()
}

/// Maps a machine architecture to its rpm base architecture.
///
/// 32-bit x86 variants collapse to `i386` and 32-bit hard-float arm to
/// `armhfp`; every other architecture is its own base architecture.
pub fn basearch_of(arch: &str) -> String {
    match arch {
        "x86" | "i386" | "i486" | "i586" | "i686" | "athlon" | "geode" => "i386".to_string(),
        "arm" | "armv7l" | "armv7hl" | "armv7hnl" | "armv8l" => "armhfp".to_string(),
        "powerpc64" => "ppc64".to_string(),
        "powerpc64le" => "ppc64le".to_string(),
        other => other.to_string(),
    }
}

/// Retrieves the rpm base architecture of the running machine.
pub fn basearch() -> String {
    basearch_of(std::env::consts::ARCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basearch_of() {
        assert_eq!(basearch_of("x86_64"), "x86_64");
        assert_eq!(basearch_of("i686"), "i386");
        assert_eq!(basearch_of("x86"), "i386");
        assert_eq!(basearch_of("armv7hl"), "armhfp");
        assert_eq!(basearch_of("aarch64"), "aarch64");
        assert_eq!(basearch_of("powerpc64le"), "ppc64le");
    }

    #[test]
    fn test_basearch() {
        #[cfg(target_arch = "x86_64")]
        assert_eq!(basearch(), "x86_64");

        #[cfg(target_arch = "aarch64")]
        assert_eq!(basearch(), "aarch64");
    }
}
