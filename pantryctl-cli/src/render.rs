//! Item lines for view, lookup and sort

use pantryctl_core::Item;

/// `id - name: Expires <date> (Last Updated: YYYY-MM-DD HH:MM:SS)`
pub fn item_line(item: &Item) -> String {
    format!(
        "{} (Last Updated: {})",
        sorted_line(item),
        item.updated_at_display()
    )
}

/// `id - name: Expires <date>`
pub fn sorted_line(item: &Item) -> String {
    format!("{} - {}: Expires {}", item.id, item.name, item.expiry)
}
