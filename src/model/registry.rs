//! Page-indexed registries of detected tables and links.
//!
//! Both sides keep a flat list in registration order plus a page → records
//! map. The link side is never filled by the extraction pipeline, but it is
//! always present so consumers can rely on a stable shape.

use std::collections::BTreeMap;

use super::BoundingBox;

/// A detected table location.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    /// Identifier of the form `page_{p}_table_{i}`
    pub table_id: String,
    /// Table bounding box
    pub bbox: BoundingBox,
}

/// A link location.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    /// Link target (URI or named destination)
    pub target: String,
    /// Link bounding box
    pub bbox: BoundingBox,
    /// Zero-based page index
    pub page_num: u32,
}

/// Registry of tables and links found in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRegistry {
    tables: Vec<TableRecord>,
    page_table_map: BTreeMap<u32, Vec<TableRecord>>,
    links: Vec<LinkRecord>,
    page_link_map: BTreeMap<u32, Vec<LinkRecord>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table found on `page_num` and return its record.
    ///
    /// The per-page index is the number of tables already registered for that
    /// page, so ids restart at 0 on every page.
    pub fn register_table(&mut self, page_num: u32, bbox: impl Into<BoundingBox>) -> &TableRecord {
        let page_tables = self.page_table_map.entry(page_num).or_default();
        let record = TableRecord {
            table_id: format!("page_{}_table_{}", page_num, page_tables.len()),
            bbox: bbox.into(),
        };
        log::debug!("registered {} at {:?}", record.table_id, record.bbox);
        page_tables.push(record.clone());
        self.tables.push(record);
        &self.tables[self.tables.len() - 1]
    }

    /// Register a link found on `page_num`.
    ///
    /// The page walk does not collect links, so extraction output always
    /// carries an empty link list and page map.
    pub fn register_link(
        &mut self,
        page_num: u32,
        target: impl Into<String>,
        bbox: impl Into<BoundingBox>,
    ) -> &LinkRecord {
        let record = LinkRecord {
            target: target.into(),
            bbox: bbox.into(),
            page_num,
        };
        self.page_link_map
            .entry(page_num)
            .or_default()
            .push(record.clone());
        self.links.push(record);
        &self.links[self.links.len() - 1]
    }

    /// All tables in registration order.
    pub fn tables(&self) -> &[TableRecord] {
        &self.tables
    }

    /// Tables grouped by page.
    pub fn page_table_map(&self) -> &BTreeMap<u32, Vec<TableRecord>> {
        &self.page_table_map
    }

    /// All links in registration order.
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    /// Links grouped by page.
    pub fn page_link_map(&self) -> &BTreeMap<u32, Vec<LinkRecord>> {
        &self.page_link_map
    }

    /// Tables registered for one page (empty if none).
    pub fn tables_on_page(&self, page_num: u32) -> &[TableRecord] {
        self.page_table_map
            .get(&page_num)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Links registered for one page (empty if none; the page walk
    /// registers no links).
    pub fn links_on_page(&self, page_num: u32) -> &[LinkRecord] {
        self.page_link_map
            .get(&page_num)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.links.is_empty()
    }
}
