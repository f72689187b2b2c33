use std::{
    env,
    path::{Component, Path, PathBuf},
};

use crate::error::{PathError, PathResult};

pub trait PathResolver {
    /// Resolves a path string that may contain environment variables
    ///
    /// This method expands environment variables in the format `$VAR` or `${VAR}`, resolves tilde
    /// (`~`) to the user's home directory when it appears at the start of the path, and converts
    /// relative paths to absolute paths based on the current working directory.
    ///
    /// # Errors
    ///
    /// * [`PathError::Empty`] if the path is empty
    /// * [`PathError::CurrentDir`] if the current directory cannot be determined
    /// * [`PathError::UnsetVariable`] if a referenced environment variable is unset
    /// * [`PathError::UnclosedVariable`] if `${` is never closed
    ///
    /// # Example
    ///
    /// ```
    /// use repoprobe_utils::error::PathResult;
    /// use repoprobe_utils::path::{PathResolver, SystemPathResolver};
    ///
    /// fn main() -> PathResult<()> {
    ///     let resolver = SystemPathResolver;
    ///     let resolved = resolver.resolve_path("$HOME/repoprobe.toml")?;
    ///     println!("Resolved path is {:#?}", resolved);
    ///     Ok(())
    /// }
    /// ```
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf>;

    /// Returns the user's home directory, from `HOME` or `/` when unset.
    fn home_dir(&self) -> PathBuf;

    /// Returns the user's config directory following XDG Base Directory Specification
    ///
    /// This method checks the `XDG_CONFIG_HOME` environment variable. If not set, it defaults to
    /// `$HOME/.config`
    fn xdg_config_home(&self) -> PathBuf;
}

/// The default [`PathResolver`] implementation using environment variables and filesystem calls.
pub struct SystemPathResolver;

impl PathResolver for SystemPathResolver {
    fn resolve_path(&self, path: &str) -> PathResult<PathBuf> {
        let path = path.trim();

        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let resolved = self.expand_variables(path)?;
        let path_buf = PathBuf::from(resolved);

        if path_buf.is_absolute() {
            Ok(path_buf)
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(path_buf))
                .map_err(PathError::CurrentDir)
        }
    }

    fn home_dir(&self) -> PathBuf {
        env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/"))
    }

    fn xdg_config_home(&self) -> PathBuf {
        env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.home_dir().join(".config"))
    }
}

impl SystemPathResolver {
    fn expand_variables(&self, path: &str) -> PathResult<String> {
        let mut result = String::with_capacity(path.len());
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '$' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        let var_name = self.consume_until(&mut chars, '}')?;
                        self.expand_env_var(&var_name, &mut result, path)?;
                    } else {
                        let var_name = self.consume_var_name(&mut chars);
                        if var_name.is_empty() {
                            result.push('$');
                        } else {
                            self.expand_env_var(&var_name, &mut result, path)?;
                        }
                    }
                }
                '~' if result.is_empty() => result.push_str(&self.home_dir().to_string_lossy()),
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    fn consume_until(
        &self,
        chars: &mut std::iter::Peekable<std::str::Chars>,
        delimiter: char,
    ) -> PathResult<String> {
        let mut var_name = String::new();

        for c in chars.by_ref() {
            if c == delimiter {
                return Ok(var_name);
            }
            var_name.push(c);
        }

        Err(PathError::UnclosedVariable {
            fragment: format!("${{{var_name}"),
        })
    }

    fn consume_var_name(&self, chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
        let mut var_name = String::new();

        while let Some(&c) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                var_name.push(c);
                chars.next();
            } else {
                break;
            }
        }

        var_name
    }

    fn expand_env_var(
        &self,
        var_name: &str,
        result: &mut String,
        original: &str,
    ) -> PathResult<()> {
        match var_name {
            "HOME" => result.push_str(&self.home_dir().to_string_lossy()),
            "XDG_CONFIG_HOME" => result.push_str(&self.xdg_config_home().to_string_lossy()),
            _ => {
                let value = env::var(var_name).map_err(|_| PathError::UnsetVariable {
                    var: var_name.into(),
                    path: original.into(),
                })?;
                result.push_str(&value);
            }
        }
        Ok(())
    }
}

/// Resolves a path string using the system path resolver.
///
/// See [`PathResolver::resolve_path`] for detailed documentation.
pub fn resolve_path(path: &str) -> PathResult<PathBuf> {
    SystemPathResolver.resolve_path(path)
}

/// Returns the user's config directory using the system path resolver.
pub fn xdg_config_home() -> PathBuf {
    SystemPathResolver.xdg_config_home()
}

/// Places `path` under `root`, the way an installroot prefixes every
/// configuration path.
///
/// Absolute paths lose their leading `/` before being joined, so
/// `reroot("/mnt/sysimage", "/etc/yum.conf")` is `/mnt/sysimage/etc/yum.conf`.
/// A root of `/` leaves the path unchanged.
pub fn reroot<R: AsRef<Path>, P: AsRef<Path>>(root: R, path: P) -> PathBuf {
    let relative: PathBuf = path
        .as_ref()
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.as_ref().join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_expand_variables_simple() {
        env::set_var("REPOPROBE_TEST_VAR", "test_value");
        let resolver = SystemPathResolver;
        let result = resolver.expand_variables("$REPOPROBE_TEST_VAR/path").unwrap();
        assert_eq!(result, "test_value/path");
        env::remove_var("REPOPROBE_TEST_VAR");
    }

    #[test]
    #[serial]
    fn test_expand_variables_braces_and_home() {
        env::set_var("REPOPROBE_TEST_VAR", "value");
        env::set_var("HOME", "/home/tester");
        let resolver = SystemPathResolver;
        assert_eq!(
            resolver.expand_variables("${REPOPROBE_TEST_VAR}_suffix").unwrap(),
            "value_suffix"
        );
        assert_eq!(
            resolver.expand_variables("~/config.toml").unwrap(),
            "/home/tester/config.toml"
        );
        env::remove_var("REPOPROBE_TEST_VAR");
    }

    #[test]
    #[serial]
    fn test_expand_variables_missing_var() {
        env::remove_var("REPOPROBE_MISSING_VAR");
        let resolver = SystemPathResolver;
        let result = resolver.expand_variables("$REPOPROBE_MISSING_VAR/path");
        assert!(matches!(
            result,
            Err(PathError::UnsetVariable { ref var, .. }) if var == "REPOPROBE_MISSING_VAR"
        ));
    }

    #[test]
    fn test_expand_variables_unclosed() {
        let resolver = SystemPathResolver;
        let result = resolver.expand_variables("${UNCLOSED/path");
        assert!(matches!(result, Err(PathError::UnclosedVariable { .. })));
    }

    #[test]
    fn test_expand_variables_lone_dollar() {
        let resolver = SystemPathResolver;
        assert_eq!(resolver.expand_variables("cost$/x").unwrap(), "cost$/x");
    }

    #[test]
    fn test_resolve_path_empty() {
        assert!(matches!(resolve_path("   "), Err(PathError::Empty)));
    }

    #[test]
    fn test_resolve_path_relative_is_absolute() {
        let resolved = resolve_path("relative/config.toml").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("relative/config.toml"));
    }

    #[test]
    #[serial]
    fn test_xdg_config_home_fallback() {
        let old = env::var("XDG_CONFIG_HOME").ok();
        env::remove_var("XDG_CONFIG_HOME");
        env::set_var("HOME", "/home/tester");
        assert_eq!(xdg_config_home(), PathBuf::from("/home/tester/.config"));
        if let Some(old) = old {
            env::set_var("XDG_CONFIG_HOME", old);
        }
    }

    #[test]
    fn test_reroot() {
        assert_eq!(
            reroot("/mnt/sysimage", "/etc/yum.conf"),
            PathBuf::from("/mnt/sysimage/etc/yum.conf")
        );
        assert_eq!(reroot("/", "/etc/yum.conf"), PathBuf::from("/etc/yum.conf"));
        assert_eq!(
            reroot("/srv/root", "etc/dnf/vars"),
            PathBuf::from("/srv/root/etc/dnf/vars")
        );
    }
}
