mod domain_file;

pub use domain_file::{load_domain_file, parse_domain_list};
