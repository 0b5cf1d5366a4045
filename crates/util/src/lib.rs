pub mod sorting;
