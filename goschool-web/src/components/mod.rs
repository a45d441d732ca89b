pub mod header_nav_item;
pub mod image_upload;
pub mod input_with_label;
pub mod loading;
pub mod map_filters;
pub mod pagination_links;
pub mod school_detail;
pub mod school_directory;
pub mod school_form;
pub mod schools_table;
pub mod search_form;
pub mod toaster;
