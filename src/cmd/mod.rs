/// Document summary command.
pub mod info;
/// Value tree rendering helpers.
pub mod print;
/// Tree loading and printing command.
pub mod show;

#[cfg(test)]
pub(crate) mod test_support;
