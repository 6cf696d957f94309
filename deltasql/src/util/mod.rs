pub use deltasql_datastructures::unique_ordered_map;

// The unchecked version unwraps insertions. This should only be used for testing.
#[cfg(test)]
#[macro_export]
macro_rules! unchecked_unique_ordered_map {
	($($key:expr => $val:expr),* $(,)?) => {{
            #[allow(unused_mut)]
            let mut out = deltasql_datastructures::unique_ordered_map::UniqueOrderedMap::new();
            $(
                out.insert($key, $val).unwrap();
            )*
            out
	}};
}
