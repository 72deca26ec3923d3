//! Section and full-page rendering.

use crate::collection::resolve_asset_url;
use crate::model::{ContentType, MediaRef, PageSection, UnifiedPageResponse};

use super::html::{HtmlRenderer, DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use super::markup::{Element, Markup};
use super::table::{render_dynamic_table, render_link_table};
use super::{RenderOptions, RenderResult};

const EMPTY_CLASS: &str = "text-gray-500 italic";

/// Render one section with the given options.
pub fn render_section(section: &PageSection, options: &RenderOptions) -> Markup {
    HtmlRenderer::new(options.clone()).render_section(section)
}

/// Render a whole page with the given options.
pub fn render_page(page: &UnifiedPageResponse, options: &RenderOptions) -> Markup {
    HtmlRenderer::new(options.clone()).render_page(page)
}

/// Render a whole page with statistics.
pub fn render_page_with_stats(page: &UnifiedPageResponse, options: &RenderOptions) -> RenderResult {
    let mut renderer = HtmlRenderer::new(options.clone().with_stats(true));
    let markup = renderer.render_page(page);
    renderer.finish(markup)
}

impl HtmlRenderer {
    /// Render a section according to its content type, with its optional
    /// image above the content.
    pub fn render_section(&mut self, section: &PageSection) -> Markup {
        let heading = Element::new("div")
            .class("flex items-center gap-3 mb-6")
            .child(Element::new("div").class("w-1 h-8 bg-purple-700 rounded-sm"))
            .child(
                Element::new("h2")
                    .class("text-2xl font-semibold text-gray-900")
                    .text(section.title.as_str()),
            );

        let main = self.section_content(section);
        let body = match section.image.as_ref().and_then(|image| self.section_image(image)) {
            Some(image) => Element::new("div")
                .class("space-y-6")
                .child(image)
                .child(main)
                .into(),
            None => main,
        };

        let mut wrapper = Element::new("section").class("min-h-[600px] p-6");
        if !section.id.is_empty() {
            wrapper = wrapper.attr("id", section_anchor(&section.id));
        }
        wrapper.child(heading).child(body).into()
    }

    fn section_content(&mut self, section: &PageSection) -> Markup {
        let table_title = section.table_title.as_deref().filter(|t| !t.is_empty());

        match section.content_type {
            ContentType::RichText => self.rich_text_block(section),
            ContentType::Table => {
                let inner = if section.table_data.is_empty() {
                    empty_notice("No table data available")
                } else {
                    self.count(|s| s.table_count += 1);
                    render_link_table(&section.table_data, table_title.unwrap_or("Table Items"))
                };
                Element::new("div").class("space-y-4").child(inner).into()
            }
            ContentType::DynamicTable => {
                let inner = match &section.dynamic_table_config {
                    Some(config) => {
                        self.count(|s| s.table_count += 1);
                        render_dynamic_table(&config.columns, &config.rows, table_title, config.variant)
                    }
                    None => empty_notice("No dynamic table data available"),
                };
                Element::new("div").class("space-y-4").child(inner).into()
            }
            ContentType::Mixed => {
                let mut block = Element::new("div")
                    .class("space-y-6")
                    .child(self.rich_text_block(section));
                if !section.table_data.is_empty() {
                    self.count(|s| s.table_count += 1);
                    block = block.child(Element::new("div").class("space-y-4").child(
                        render_link_table(&section.table_data, table_title.unwrap_or("Related Links")),
                    ));
                }
                block.into()
            }
            ContentType::MixedDynamic => {
                let mut block = Element::new("div")
                    .class("space-y-6")
                    .child(self.rich_text_block(section));
                if let Some(config) = &section.dynamic_table_config {
                    self.count(|s| s.table_count += 1);
                    block = block.child(Element::new("div").class("space-y-4").child(
                        render_dynamic_table(
                            &config.columns,
                            &config.rows,
                            Some(table_title.unwrap_or("Data Table")),
                            config.variant,
                        ),
                    ));
                }
                block.into()
            }
            ContentType::MixedMultipleTables => {
                let mut block = Element::new("div")
                    .class("space-y-6")
                    .child(self.rich_text_block(section));
                if !section.multiple_tables_config.is_empty() {
                    let tables: Vec<Markup> = section
                        .multiple_tables_config
                        .iter()
                        .map(|table| {
                            self.count(|s| s.table_count += 1);
                            let mut holder = Element::new("div").class("space-y-4");
                            if !table.id.is_empty() {
                                holder = holder.attr("data-table-id", table.id.as_str());
                            }
                            holder
                                .child(render_dynamic_table(
                                    &table.columns,
                                    &table.rows,
                                    Some(table.table_title.as_str()),
                                    table.variant,
                                ))
                                .into()
                        })
                        .collect();
                    block = block.child(Element::new("div").class("space-y-8").children(tables));
                }
                block.into()
            }
        }
    }

    fn rich_text_block(&mut self, section: &PageSection) -> Markup {
        Element::new("div")
            .class("text-gray-700")
            .child(self.render_rich_text(&section.content))
            .into()
    }

    fn section_image(&mut self, image: &MediaRef) -> Option<Markup> {
        let url = image.url.as_deref().filter(|u| !u.is_empty())?;
        self.count(|s| s.image_count += 1);
        let width = image.width.filter(|w| *w > 0).unwrap_or(DEFAULT_IMAGE_WIDTH);
        let height = image.height.filter(|h| *h > 0).unwrap_or(DEFAULT_IMAGE_HEIGHT);
        let src = resolve_asset_url(url, self.options().asset_base_url.as_deref());

        Some(
            Element::new("div")
                .class("w-full")
                .child(
                    Element::new("div").class("relative w-full max-w-4xl").child(
                        Element::new("img")
                            .attr("src", src)
                            .attr("alt", image.alt.as_deref().unwrap_or("Section Image"))
                            .attr("width", width.to_string())
                            .attr("height", height.to_string())
                            .attr("loading", "lazy")
                            .class("rounded-lg object-cover w-full h-auto min-h-[300px] max-h-[600px]")
                            .attr("style", format!("aspect-ratio: {width}/{height}")),
                    ),
                )
                .into(),
        )
    }

    /// Render a full page: title block with breadcrumb, then section
    /// navigation and every active section in order.
    pub fn render_page(&mut self, page: &UnifiedPageResponse) -> Markup {
        let slug = page.slug.as_deref().unwrap_or_default();
        let sections = page.active_sections();

        let container = Element::new("div").class("container mx-auto px-4 py-8");
        let container = if sections.is_empty() {
            container.child(no_content_block())
        } else {
            let nav_items: Vec<Markup> = sections
                .iter()
                .map(|section| {
                    Markup::from(
                        Element::new("li").child(
                            Element::new("a")
                                .attr("href", format!("#{}", section_anchor(&section.id)))
                                .class("block px-4 py-2 text-gray-700 hover:bg-purple-50 hover:text-purple-900 rounded")
                                .text(section.title.as_str()),
                        ),
                    )
                })
                .collect();
            let aside = Element::new("aside")
                .class("w-full md:w-64 flex-shrink-0 mb-6 md:mb-0")
                .child(
                    Element::new("nav")
                        .attr("aria-label", "Sections")
                        .child(
                            Element::new("h3")
                                .class("text-sm font-semibold text-gray-500 mb-2")
                                .text("SECTIONS"),
                        )
                        .child(Element::new("ul").class("space-y-1").children(nav_items)),
                );

            let rendered: Vec<Markup> = sections
                .iter()
                .map(|section| self.render_section(section))
                .collect();
            let main = Element::new("main")
                .class("flex-1 min-h-[600px]")
                .children(rendered);

            container.child(
                Element::new("div")
                    .class("max-w-6xl mx-auto flex flex-col md:flex-row gap-8")
                    .child(aside)
                    .child(main),
            )
        };

        Element::new("div")
            .class("min-h-screen")
            .child(title_block(page, slug))
            .child(container)
            .into()
    }
}

/// Fragment id of a section.
pub fn section_anchor(id: &str) -> String {
    format!("section-{id}")
}

fn empty_notice(text: &str) -> Markup {
    Element::new("p").class(EMPTY_CLASS).text(text).into()
}

fn title_block(page: &UnifiedPageResponse, slug: &str) -> Markup {
    let crumbs = page.breadcrumbs(slug);
    let last = crumbs.len().saturating_sub(1);
    let items = crumbs.iter().enumerate().map(|(index, crumb)| {
        let item = Element::new("li").class("inline-flex items-center");
        if index == last {
            Markup::from(
                item.child(
                    Element::new("span")
                        .attr("aria-current", "page")
                        .class("font-medium")
                        .text(crumb.label.as_str()),
                ),
            )
        } else {
            Markup::from(
                item.child(
                    Element::new("a")
                        .attr("href", crumb.href.as_str())
                        .class("hover:underline")
                        .text(crumb.label.as_str()),
                ),
            )
        }
    });

    let mut block = Element::new("header")
        .class("bg-purple-900 text-white py-12 px-4")
        .child(
            Element::new("nav")
                .attr("aria-label", "Breadcrumb")
                .class("text-sm mb-4")
                .child(Element::new("ol").class("flex flex-wrap gap-2").children(items)),
        )
        .child(
            Element::new("h1")
                .class("text-4xl font-bold")
                .text(page.hero_title.as_str()),
        );
    if let Some(subtitle) = page.hero_subtitle.as_deref().filter(|s| !s.is_empty()) {
        block = block.child(Element::new("p").class("mt-2 text-lg").text(subtitle));
    }
    block.into()
}

fn no_content_block() -> Markup {
    Element::new("div")
        .class("text-center py-16")
        .child(
            Element::new("h2")
                .class("text-2xl font-bold text-gray-800 mb-2")
                .text("No Content Available"),
        )
        .child(
            Element::new("p")
                .class("text-gray-600")
                .text("This page doesn't have any sections configured yet."),
        )
        .into()
}
