/// Sets or removes environment variables until dropped, then restores the
/// previous values, also when a test assertion panics.
pub struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    /// `Some(value)` sets a variable, `None` removes it.
    pub fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect();

        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }

        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_scoped_env_restores_after_panic() {
        std::env::set_var("REPOPROBE_SCOPED", "before");
        std::env::remove_var("REPOPROBE_SCOPED_NEW");

        let result = std::panic::catch_unwind(|| {
            let _env = ScopedEnv::new(&[
                ("REPOPROBE_SCOPED", None),
                ("REPOPROBE_SCOPED_NEW", Some("set")),
            ]);
            assert!(std::env::var("REPOPROBE_SCOPED").is_err());
            assert_eq!(std::env::var("REPOPROBE_SCOPED_NEW").unwrap(), "set");
            panic!("failing test body");
        });

        assert!(result.is_err());
        assert_eq!(std::env::var("REPOPROBE_SCOPED").unwrap(), "before");
        assert!(std::env::var("REPOPROBE_SCOPED_NEW").is_err());
        std::env::remove_var("REPOPROBE_SCOPED");
    }
}
