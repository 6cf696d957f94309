pub mod unique_ordered_map;
