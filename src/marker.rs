//! Reply marker scanning.
//!
//! A reply marker is the escaped sigil `&gt;&gt;` followed by ASCII digits,
//! e.g. `&gt;&gt;12`. The digits are the id of the post being replied to.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{trace, warn};

use crate::record::PostId;

/// Sigil that opens a reply marker, as it appears in escaped content.
pub const REPLY_SIGIL: &str = "&gt;&gt;";

lazy_static! {
    static ref REPLY_MARKER: Regex = Regex::new(r"&gt;&gt;([0-9]+)").expect("valid regex");
}

/// Extract reply target ids from post content, left to right.
///
/// Duplicates and self-references are kept. Markers whose digits do not fit
/// a [`PostId`] saturate to `PostId::MAX`, so they still count as markers and
/// point at a post that cannot exist.
///
/// # Example
///
/// ```
/// use dat_rs::marker::reply_targets;
///
/// assert_eq!(reply_targets("&gt;&gt;3&gt;&gt;3 &gt;&gt;1"), vec![3, 3, 1]);
/// assert!(reply_targets("&gt;&gt; no digits").is_empty());
/// ```
pub fn reply_targets(content: &str) -> Vec<PostId> {
    REPLY_MARKER
        .captures_iter(content)
        .map(|caps| {
            let digits = &caps[1];
            match digits.parse::<PostId>() {
                Ok(post_id) => {
                    trace!(post_id, "reply marker");
                    post_id
                }
                Err(_) => {
                    warn!(digits, "reply marker target out of range, saturating");
                    PostId::MAX
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        assert!(reply_targets("ただの書き込み").is_empty());
    }

    #[test]
    fn test_single_marker() {
        assert_eq!(reply_targets("&gt;&gt;1 乙"), vec![1]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        assert_eq!(reply_targets("&gt;&gt;3&gt;&gt;3"), vec![3, 3]);
        assert_eq!(reply_targets("&gt;&gt;10<br>&gt;&gt;2"), vec![10, 2]);
    }

    #[test]
    fn test_unescaped_sigil_not_a_marker() {
        assert!(reply_targets(">>5").is_empty());
        assert!(reply_targets("&gt;5").is_empty());
    }

    #[test]
    fn test_fullwidth_digits_not_a_marker() {
        assert!(reply_targets("&gt;&gt;５").is_empty());
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(reply_targets("&gt;&gt;007"), vec![7]);
    }

    #[test]
    fn test_overflowing_target_saturates() {
        let content = "&gt;&gt;99999999999999999999999 &gt;&gt;2";
        assert_eq!(reply_targets(content), vec![PostId::MAX, 2]);
        assert_eq!(reply_targets("&gt;&gt;18446744073709551615"), vec![PostId::MAX]);
    }

    #[test]
    fn test_range_marker_takes_first_number() {
        // "&gt;&gt;1-3" only names post 1
        assert_eq!(reply_targets("&gt;&gt;1-3"), vec![1]);
    }
}
