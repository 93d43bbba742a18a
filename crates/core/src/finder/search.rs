//! Anchor-relative text lookup on converted pages.

use regex::Regex;
use tracing::{debug, info, warn};

use crate::dom::{Document, TextBox};
use crate::error::Result;
use crate::geometry::BoundingBox;

use super::anchor::Anchor;
use super::locator::Locator;
use super::options::{Direction, FindOptions};

/// Allowed difference between the tops of an anchor and a candidate on the
/// same row.
pub const PIXEL_TOLERANCE: i64 = 5;

impl Document {
    /// The anchor set by the last successful [`Document::set_anchor_to_element`].
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Makes the element described by `locator` the current anchor.
    ///
    /// Returns false, leaving no anchor, when the text matches no text box
    /// or more than one.
    pub fn set_anchor_to_element(&mut self, locator: &str) -> Result<bool> {
        self.anchor = None;
        let locator_kind = Locator::parse(locator)?;
        if !self.is_converted() {
            self.convert(true, None)?;
        }
        let text = match locator_kind {
            Locator::Coords(bbox) => {
                self.anchor = Some(Anchor::from_coords(bbox));
                return Ok(true);
            }
            Locator::Text(text) => text,
        };

        let wanted = text.to_lowercase();
        let mut matches: Vec<(usize, Anchor)> = self
            .get_pages()?
            .iter()
            .flat_map(|(pageno, page)| page.textboxes().map(move |(_, t)| (*pageno, t)))
            .filter(|(_, t)| t.text().to_lowercase() == wanted)
            .map(|(pageno, t)| (pageno, Anchor::from_textbox(t)))
            .collect();

        match matches.len() {
            0 => {
                info!(locator, "anchor text not found");
                Ok(false)
            }
            1 => {
                let (_, anchor) = matches.remove(0);
                debug!(boxid = anchor.boxid(), bbox = %anchor.bbox(), "anchor set");
                self.anchor = Some(anchor);
                Ok(true)
            }
            count => {
                warn!(locator, count, "anchor text is ambiguous");
                for (pageno, candidate) in &matches {
                    warn!(
                        page = pageno,
                        boxid = candidate.boxid(),
                        bbox = %candidate.bbox(),
                        text = candidate.text(),
                        "anchor candidate"
                    );
                }
                Ok(false)
            }
        }
    }

    /// Text boxes on `options.pagenum` positioned relative to `locator`.
    ///
    /// With `only_closest` the result holds at most the nearest candidate.
    /// An unresolved anchor yields an empty result.
    pub fn find_text(&mut self, locator: &str, options: &FindOptions) -> Result<Vec<TextBox>> {
        let pattern = options
            .regexp
            .as_deref()
            .map(|re| Regex::new(&format!("^(?:{re})")))
            .transpose()?;

        if !self.set_anchor_to_element(locator)? {
            info!(locator, "no anchor, nothing to search from");
            return Ok(Vec::new());
        }
        let Some(anchor) = self.anchor.clone() else {
            return Ok(Vec::new());
        };
        self.convert(true, Some(options.pagenum))?;

        let page = self.get_page(options.pagenum)?;
        let candidates = page
            .textboxes()
            .map(|(_, t)| t)
            .filter(|t| t.boxid() != anchor.boxid())
            .filter(|t| is_eligible(&anchor.bbox(), &t.bbox(), options.direction, options.strict))
            .filter(|t| pattern.as_ref().is_none_or(|re| re.is_match(t.text())));

        if !options.only_closest {
            return Ok(candidates.cloned().collect());
        }
        let mut closest: Option<(f64, &TextBox)> = None;
        for candidate in candidates {
            let d = distance(&anchor.bbox(), &candidate.bbox(), options.direction);
            if closest.is_none_or(|(best, _)| d < best) {
                closest = Some((d, candidate));
            }
        }
        Ok(closest.map(|(_, t)| t.clone()).into_iter().collect())
    }
}

/// Whether `candidate` lies in `direction` from `anchor`.
pub fn is_eligible(
    anchor: &BoundingBox,
    candidate: &BoundingBox,
    direction: Direction,
    strict: bool,
) -> bool {
    let aligned = if strict {
        candidate.right() == anchor.right() || candidate.left() == anchor.left()
    } else {
        candidate.right() <= anchor.right() || candidate.left() >= anchor.left()
    };
    match direction {
        Direction::Right | Direction::Left
            if (candidate.top() - anchor.top()).abs() > PIXEL_TOLERANCE =>
        {
            false
        }
        Direction::Right => candidate.left() >= anchor.right(),
        Direction::Left => candidate.right() <= anchor.left(),
        Direction::Up => candidate.bottom() >= anchor.top() && aligned,
        Direction::Down => candidate.top() <= anchor.bottom() && aligned,
        Direction::Box => anchor.contains(candidate),
    }
}

/// Distance used to rank eligible candidates.
///
/// The horizontal part measures from the anchor's right edge to the nearer
/// edge of the candidate, not between centres.
pub fn distance(anchor: &BoundingBox, candidate: &BoundingBox, direction: Direction) -> f64 {
    let dy = match direction {
        Direction::Down => anchor.bottom() - candidate.top(),
        Direction::Up => anchor.top() - candidate.bottom(),
        _ => anchor.top() - candidate.top(),
    };
    let dx = (anchor.right() - candidate.right())
        .abs()
        .min((anchor.right() - candidate.left()).abs());
    ((dx * dx + dy * dy) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: BoundingBox = BoundingBox::new(50, 700, 150, 710);

    #[test]
    fn test_horizontal_tolerance_is_inclusive() {
        let anchor = BoundingBox::new(50, 90, 150, 100);
        let within = BoundingBox::new(160, 95, 200, 105);
        let outside = BoundingBox::new(160, 96, 200, 106);
        assert!(is_eligible(&anchor, &within, Direction::Right, false));
        assert!(!is_eligible(&anchor, &outside, Direction::Right, false));
    }

    #[test]
    fn test_left_requires_candidate_before_anchor() {
        let before = BoundingBox::new(0, 700, 50, 710);
        let overlapping = BoundingBox::new(0, 700, 51, 710);
        assert!(is_eligible(&ANCHOR, &before, Direction::Left, false));
        assert!(!is_eligible(&ANCHOR, &overlapping, Direction::Left, false));
    }

    #[test]
    fn test_vertical_strict_needs_shared_edge() {
        let candidate = BoundingBox::new(80, 600, 140, 610);
        assert!(is_eligible(&ANCHOR, &candidate, Direction::Down, false));
        assert!(!is_eligible(&ANCHOR, &candidate, Direction::Down, true));

        let same_left = BoundingBox::new(50, 600, 300, 610);
        assert!(is_eligible(&ANCHOR, &same_left, Direction::Down, true));
    }

    #[test]
    fn test_up_requires_candidate_above() {
        let above = BoundingBox::new(60, 710, 140, 720);
        let below = BoundingBox::new(60, 600, 140, 610);
        assert!(is_eligible(&ANCHOR, &above, Direction::Up, false));
        assert!(!is_eligible(&ANCHOR, &below, Direction::Up, false));
    }

    #[test]
    fn test_box_requires_containment() {
        let anchor = BoundingBox::new(0, 0, 100, 100);
        assert!(is_eligible(&anchor, &BoundingBox::new(10, 10, 20, 20), Direction::Box, false));
        assert!(!is_eligible(&anchor, &BoundingBox::new(90, 10, 110, 20), Direction::Box, false));
    }

    #[test]
    fn test_distance_uses_nearest_edge() {
        let near = BoundingBox::new(160, 700, 260, 710);
        assert_eq!(distance(&ANCHOR, &near, Direction::Right), 10.0);

        let below = BoundingBox::new(50, 670, 150, 680);
        assert_eq!(distance(&ANCHOR, &below, Direction::Down), 20.0);
    }
}
