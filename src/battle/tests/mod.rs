pub mod common;


#[cfg(test)]
mod test_field_conditions;
