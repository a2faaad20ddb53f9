//! Horizontally scrolling slide carousel.
//!
//! All paging decisions happen here at build time. [`ScrollCarousel::attach`]
//! writes the stop positions and the next/prev transition tables into data
//! attributes, and `static/carousel.js` does nothing but look them up and
//! call `scrollTo`. That keeps the behavior testable without a browser.
//!
//! A *stop* is the index of the first slide of a page of `per_view` slides.
//! With 7 slides and 3 per view the stops are `[0, 3, 4]`: the last page is
//! pulled back so it stays full instead of showing a lone slide.

use maud::{Markup, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollCarousel {
    slides: usize,
    per_view: usize,
    wrap: bool,
}

impl ScrollCarousel {
    /// `per_view` is clamped to `1..=slides` (a zero-slide carousel keeps a
    /// single empty stop).
    pub fn new(slides: usize, per_view: usize, wrap: bool) -> Self {
        Self {
            slides,
            per_view: per_view.clamp(1, slides.max(1)),
            wrap,
        }
    }

    /// Slide index at which each page begins.
    pub fn stops(&self) -> Vec<usize> {
        if self.slides <= self.per_view {
            return vec![0];
        }
        let last = self.slides - self.per_view;
        let mut stops: Vec<usize> = (0..last).step_by(self.per_view).collect();
        stops.push(last);
        stops
    }

    /// Stop index reached from `stop` by moving one page in `direction`.
    /// Wraps around the ends when `wrap` is set, otherwise stays put.
    pub fn advance(&self, stop: usize, direction: Direction) -> usize {
        let count = self.stops().len();
        let stop = stop.min(count - 1);
        match direction {
            Direction::Next if stop + 1 < count => stop + 1,
            Direction::Next if self.wrap => 0,
            Direction::Prev if stop > 0 => stop - 1,
            Direction::Prev if self.wrap => count - 1,
            _ => stop,
        }
    }

    fn transition_table(&self, direction: Direction) -> String {
        (0..self.stops().len())
            .map(|stop| self.advance(stop, direction).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Wrap already-rendered slides in a carousel container with controls.
    ///
    /// `slides` must render exactly `self.slides` `.carousel-slide`
    /// elements; the script measures slide width from the first one.
    pub fn attach(&self, container_id: &str, slides: Markup) -> Markup {
        let stops = self.stops();
        let stops_attr = stops
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        html! {
            div.carousel id=(container_id)
                data-stops=(stops_attr)
                data-next=(self.transition_table(Direction::Next))
                data-prev=(self.transition_table(Direction::Prev))
                style={ "--per-view: " (self.per_view) ";" } {
                div.carousel-track tabindex="0" {
                    (slides)
                }
                @if stops.len() > 1 {
                    div.carousel-controls {
                        button type="button" class="carousel-prev" aria-label="Previous slides" { "‹" }
                        div.carousel-dots {
                            @for (i, _) in stops.iter().enumerate() {
                                button type="button" class="carousel-dot" data-stop=(i)
                                    aria-label={ "Go to slide group " (i + 1) } {}
                            }
                        }
                        button type="button" class="carousel-next" aria-label="Next slides" { "›" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_for_exact_pages() {
        assert_eq!(ScrollCarousel::new(6, 3, true).stops(), vec![0, 3]);
    }

    #[test]
    fn last_page_is_pulled_back_to_stay_full() {
        assert_eq!(ScrollCarousel::new(7, 3, true).stops(), vec![0, 3, 4]);
    }

    #[test]
    fn fewer_slides_than_per_view_is_single_stop() {
        let c = ScrollCarousel::new(2, 3, true);
        assert_eq!(c.stops(), vec![0]);
        assert_eq!(c.per_view, 2);
    }

    #[test]
    fn empty_carousel_has_one_stop() {
        let c = ScrollCarousel::new(0, 3, true);
        assert_eq!(c.stops(), vec![0]);
        assert_eq!(c.advance(0, Direction::Next), 0);
    }

    #[test]
    fn zero_per_view_clamped_to_one() {
        let c = ScrollCarousel::new(3, 0, false);
        assert_eq!(c.stops(), vec![0, 1, 2]);
    }

    #[test]
    fn advance_wraps_at_both_ends() {
        let c = ScrollCarousel::new(7, 3, true);
        assert_eq!(c.advance(0, Direction::Next), 1);
        assert_eq!(c.advance(2, Direction::Next), 0);
        assert_eq!(c.advance(0, Direction::Prev), 2);
    }

    #[test]
    fn advance_clamps_without_wrap() {
        let c = ScrollCarousel::new(7, 3, false);
        assert_eq!(c.advance(2, Direction::Next), 2);
        assert_eq!(c.advance(0, Direction::Prev), 0);
        assert_eq!(c.advance(1, Direction::Prev), 0);
    }

    #[test]
    fn advance_from_out_of_range_stop_starts_from_last() {
        let c = ScrollCarousel::new(6, 3, false);
        assert_eq!(c.advance(9, Direction::Prev), 0);
    }

    #[test]
    fn attach_writes_transition_tables() {
        let c = ScrollCarousel::new(7, 3, true);
        let html = c.attach("about-gallery", html! { div.carousel-slide {} }).into_string();
        assert!(html.contains(r#"id="about-gallery""#));
        assert!(html.contains(r#"data-stops="0,3,4""#));
        assert!(html.contains(r#"data-next="1,2,0""#));
        assert!(html.contains(r#"data-prev="2,0,1""#));
        assert_eq!(html.matches(r#"class="carousel-dot""#).count(), 3);
    }

    #[test]
    fn single_stop_has_no_controls() {
        let c = ScrollCarousel::new(2, 3, true);
        let html = c.attach("g", html! {}).into_string();
        assert!(!html.contains("carousel-controls"));
    }
}
