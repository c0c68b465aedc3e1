mod tests_basic;
mod tests_set_algebra;
