use ocm_load::error::AppResult;

fn main() -> AppResult<()> {
    ocm_load::entry::run()
}
