//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html! {
            li
            {
                @if self.is_current {
                    a href=(self.url) class=(style) aria-current="page" { (self.title) }
                } @else {
                    a href=(self.url) class=(style) { (self.title) }
                }
            }
        }
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = [
            (endpoints::DASHBOARD_VIEW, "Dashboard"),
            (endpoints::HISTORY_VIEW, "History"),
            (endpoints::SETTINGS_VIEW, "Settings"),
        ]
        .into_iter()
        .map(|(url, title)| Link {
            url,
            title,
            is_current: active_endpoint == url,
        })
        .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Expense Tracker"
                        }
                    }

                    ul
                        class="font-medium flex flex-row gap-4 p-0 lg:space-x-8
                            rtl:space-x-reverse"
                    {
                        @for link in self.links {
                            (link.into_html())
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use scraper::{Html, Selector};

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn marks_only_active_link_as_current() {
        let html = Html::parse_fragment(
            &NavBar::new(endpoints::HISTORY_VIEW)
                .into_html()
                .into_string(),
        );

        let current: Vec<_> = html
            .select(&Selector::parse("a[aria-current='page']").unwrap())
            .collect();

        assert_eq!(current.len(), 1);
        assert_eq!(current[0].value().attr("href"), Some(endpoints::HISTORY_VIEW));
    }

    #[test]
    fn links_to_every_view() {
        let html = Html::parse_fragment(
            &NavBar::new(endpoints::DASHBOARD_VIEW)
                .into_html()
                .into_string(),
        );

        let hrefs: Vec<_> = html
            .select(&Selector::parse("li a").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .collect();

        assert_eq!(
            hrefs,
            [
                endpoints::DASHBOARD_VIEW,
                endpoints::HISTORY_VIEW,
                endpoints::SETTINGS_VIEW
            ]
        );
    }
}
