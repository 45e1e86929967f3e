use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "git-sweep")]
#[command(about = "Clean up local and remote branches already merged into master")]
#[command(long_about = "git-sweep lists every branch merged into the master branch and deletes \
                        the local and remote copies after confirmation. Without -D it only \
                        announces what it would delete.")]
pub struct Cli {
    /// Actually delete branches (default is a dry run)
    #[arg(short = 'D', long = "delete", help = "Perform deletions instead of only announcing them")]
    pub delete: bool,

    /// Master branch that merge status is evaluated against
    #[arg(
        short = 'm',
        long = "master",
        env = "GIT_SWEEP_MASTER",
        default_value = "master",
        help = "Name of the master branch"
    )]
    pub master: String,

    /// Remote that swept branches are deleted from
    #[arg(
        short = 'r',
        long = "remote",
        env = "GIT_SWEEP_REMOTE",
        default_value = "origin",
        help = "Name of the remote"
    )]
    pub remote: String,
}
