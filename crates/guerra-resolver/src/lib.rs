mod resolve;

pub use resolve::{
    folder_name, profile_display_name, resolve, resolve_source, resolve_target_dir,
};

#[cfg(test)]
mod tests;
