/// Reducer is the application's aggregation function. It is called once per
/// distinct key with every value recorded for that key, in map task order.
pub trait Reducer {
    fn reduce(&self, key: &str, values: &[String]) -> String;
}

impl<F> Reducer for F
where
    F: Fn(&str, &[String]) -> String,
{
    fn reduce(&self, key: &str, values: &[String]) -> String {
        self(key, values)
    }
}
