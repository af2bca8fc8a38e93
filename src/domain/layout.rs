use serde::Serialize;

pub const TINY_MAX_WIDTH: u32 = 375;
pub const SMALL_MAX_WIDTH: u32 = 480;
pub const MOBILE_MAX_WIDTH: u32 = 768;
pub const TABLET_MAX_WIDTH: u32 = 1024;

/// Layout flags derived from a viewport width in CSS pixels.
///
/// Upper bounds are exclusive: tiny < 375 ≤ small < 480 ≤ mobile < 768 ≤
/// tablet < 1024 ≤ desktop. `tiny` implies `small` implies `mobile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breakpoints {
    pub width: u32,
    pub is_tiny: bool,
    pub is_small: bool,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClass {
    Tiny,
    Small,
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoints {
    pub fn from_width(width: u32) -> Self {
        Self {
            width,
            is_tiny: width < TINY_MAX_WIDTH,
            is_small: width < SMALL_MAX_WIDTH,
            is_mobile: width < MOBILE_MAX_WIDTH,
            is_tablet: (MOBILE_MAX_WIDTH..TABLET_MAX_WIDTH).contains(&width),
            is_desktop: width >= TABLET_MAX_WIDTH,
        }
    }

    /// The single most specific class for this width.
    pub fn class(&self) -> LayoutClass {
        if self.is_tiny {
            LayoutClass::Tiny
        } else if self.is_small {
            LayoutClass::Small
        } else if self.is_mobile {
            LayoutClass::Mobile
        } else if self.is_tablet {
            LayoutClass::Tablet
        } else {
            LayoutClass::Desktop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Breakpoints::from_width(374).class(), LayoutClass::Tiny);
        assert_eq!(Breakpoints::from_width(375).class(), LayoutClass::Small);
        assert_eq!(Breakpoints::from_width(479).class(), LayoutClass::Small);
        assert_eq!(Breakpoints::from_width(480).class(), LayoutClass::Mobile);
        assert_eq!(Breakpoints::from_width(767).class(), LayoutClass::Mobile);
        assert_eq!(Breakpoints::from_width(768).class(), LayoutClass::Tablet);
        assert_eq!(Breakpoints::from_width(1023).class(), LayoutClass::Tablet);
        assert_eq!(Breakpoints::from_width(1024).class(), LayoutClass::Desktop);
    }

    #[test]
    fn test_partition_holds_for_every_width() {
        for width in 0..3000 {
            let bp = Breakpoints::from_width(width);

            if bp.is_tiny {
                assert!(bp.is_small, "tiny without small at {}", width);
            }
            if bp.is_small {
                assert!(bp.is_mobile, "small without mobile at {}", width);
            }

            let partitions = [
                bp.is_tiny,
                bp.is_small && !bp.is_tiny,
                bp.is_mobile && !bp.is_small,
                bp.is_tablet,
                bp.is_desktop,
            ];
            let held = partitions.iter().filter(|p| **p).count();
            assert_eq!(held, 1, "width {} falls in {} partitions", width, held);
        }
    }
}
