mod launch_outcome;
mod serve_options;
