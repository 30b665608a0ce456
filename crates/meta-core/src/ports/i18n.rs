//! Message resolver trait (port)

#[cfg_attr(test, mockall::automock)]
pub trait MessageResolver: Send + Sync {
    /// Translation of `key`, or `key` itself when untranslated.
    fn get(&self, key: &str) -> String;

    fn get_with_args(&self, key: &str, args: &[String]) -> String {
        format_positional(&self.get(key), args)
    }

    /// Singular or plural form picked by `count`, which fills `{0}`.
    fn get_plural(&self, singular: &str, plural: &str, count: i64) -> String {
        let key = if count == 1 { singular } else { plural };
        format_positional(&self.get(key), &[count.to_string()])
    }
}

/// Resolver used when no bundle is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughMessages;

impl MessageResolver for PassThroughMessages {
    fn get(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Replace `{0}`, `{1}`, ... with the matching argument. Unknown indices stay as written.
pub fn format_positional(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let arg = after[..close].parse::<usize>().ok().and_then(|i| args.get(i))?;
            Some((arg, close))
        });

        match replaced {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
