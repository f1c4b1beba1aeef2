mod common;
mod records;
mod routing;
