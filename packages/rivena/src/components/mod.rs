mod avatar;
pub use avatar::*;

mod button;
pub use button::*;

mod card;
pub use card::*;

mod input;
pub use input::*;

mod slot;
pub use slot::*;

mod tooltip;
pub use tooltip::*;

use crate::{merge::cn, props::Props};

/// Prepends a component's base classes to the class list its caller passed.
pub(crate) fn with_base_class(mut props: Props, base: &str) -> Props {
    let class = cn([base, props.class().unwrap_or_default()]);
    props.set("class", class);
    props
}
