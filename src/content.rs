//! Static page content for the demo site.
//!
//! The page is a fixed column of four sections. Each section carries a title,
//! a highlight row (the anchor the marker trio parks on), and body copy.
//! Sections are resolved once at startup and never change at runtime.

/// Number of sections on the page. The watcher, scheduler and layout all
/// assume this is fixed for the lifetime of the process.
pub const SECTION_COUNT: usize = 4;

/// One section of the page.
pub struct SectionContent {
    pub slug: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub body: &'static [&'static str],
}

pub const PAGE_SECTIONS: [SectionContent; SECTION_COUNT] = [
    SectionContent {
        slug: "hero",
        title: "Build on your own terms",
        tagline: "A studio for teams that want leverage without lock-in.",
        body: &[
            "We help small teams ship data products that stay theirs: no rented \
             platforms, no black boxes, no surprise invoices.",
            "Scroll down to see what we do, who we are, and what we have been \
             writing about lately.",
        ],
    },
    SectionContent {
        slug: "services",
        title: "Services",
        tagline: "From first prototype to production handover.",
        body: &[
            "Product discovery sprints that end with something running, not a \
             slide deck.",
            "Pipeline and model work sized to your data, delivered with the \
             operational runbook your team will actually use.",
            "Audits of existing systems with a prioritized, costed fix list.",
        ],
    },
    SectionContent {
        slug: "about",
        title: "About",
        tagline: "Small by choice, senior by default.",
        body: &[
            "We are a handful of engineers who have built and operated systems \
             at companies you have heard of, and decided we prefer working \
             directly with the people who own the problem.",
            "Every engagement is staffed by the people you talked to in the \
             first call.",
        ],
    },
    SectionContent {
        slug: "articles",
        title: "Articles",
        tagline: "Notes from recent work.",
        body: &[
            "Why your first data product should be boring.",
            "A field guide to handover documents that survive contact with \
             on-call.",
            "What we learned migrating three clients off the same vendor in one \
             quarter.",
        ],
    },
];

/// Stable signature of the page content, used to key the session cache so a
/// stale cached section index is not applied to a different page.
pub fn content_signature() -> String {
    PAGE_SECTIONS
        .iter()
        .map(|section| section.slug)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_covers_every_section() {
        let signature = content_signature();
        for section in &PAGE_SECTIONS {
            assert!(signature.contains(section.slug));
        }
    }
}
