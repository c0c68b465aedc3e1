mod tests_delete;
