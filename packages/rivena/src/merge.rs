use crate::{
    handler::Handler,
    props::{PropValue, Props},
};

/// Returns `true` for event-handler prop keys: `on` followed by an uppercase letter, as in
/// `onClick` or `onSubmit`.
pub fn is_handler_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next() == Some('o')
        && chars.next() == Some('n')
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Joins class lists with single spaces, skipping empty entries. Entries are joined as given,
/// so surrounding whitespace and duplicates are kept.
pub fn cn<'a, I>(classes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    classes
        .into_iter()
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merges `forwarded` props onto a target's own props.
///
/// - Event handlers set on both sides are composed: the target's runs first, then the forwarded
///   one, each with the same event.
/// - `style` maps are shallow-merged, with the target's keys winning.
/// - `class` lists are concatenated, forwarded first.
/// - For every other key the target's value wins, and keys only the forwarded side sets are
///   copied through.
pub fn merge_props(forwarded: &Props, target: &Props) -> Props {
    let mut merged = target.clone();

    for (key, forwarded_value) in forwarded.iter() {
        let target_value = target.get(key);

        if is_handler_key(key) {
            match (forwarded_value, target_value) {
                (PropValue::Handler(forwarded), Some(PropValue::Handler(target))) => {
                    merged.set(key, Handler::chain(target, forwarded));
                }
                (_, Some(_)) => {}
                (forwarded, None) => merged.set(key, forwarded.clone()),
            }
        } else if key == "style" {
            match (forwarded_value, target_value) {
                (PropValue::Style(forwarded), Some(PropValue::Style(target))) => {
                    merged.set(key, forwarded.merged(target));
                }
                (_, Some(_)) => {}
                (forwarded, None) => merged.set(key, forwarded.clone()),
            }
        } else if key == "class" {
            let class = cn([
                forwarded_value.as_str().unwrap_or_default(),
                target_value.and_then(PropValue::as_str).unwrap_or_default(),
            ]);
            if class.is_empty() {
                merged.remove(key);
            } else {
                merged.set(key, class);
            }
        } else if target_value.is_none() {
            merged.set(key, forwarded_value.clone());
        }
    }

    merged
}
