//! Bundled language templates, used when the provider has none.

/// A language codegenesis can scaffold without network access.
#[derive(Debug)]
pub struct Language {
    pub name: &'static str,
    pub gitignore: &'static str,
    /// Starter files as (relative path, content).
    pub files: &'static [(&'static str, &'static str)],
}

pub const LANGUAGES: &[Language] = &[
    Language {
        name: "Python",
        gitignore: "__pycache__/\n*.py[cod]\n*$py.class\nvenv/\nenv/\n.venv/\n.Python\nbuild/\ndist/\n*.egg-info/\n*.log\n*.sqlite3\n",
        files: &[
            ("requirements.txt", "# Add your project dependencies here\n"),
            ("main.py", "# Your Python code here\n"),
        ],
    },
    Language {
        name: "C",
        gitignore: "*.o\n*.obj\n*.exe\n*.out\n*.a\n*.so\n*.dylib\nbuild/\n",
        files: &[
            (
                "main.c",
                "#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}\n",
            ),
            (
                "Makefile",
                "CC = gcc\nCFLAGS = -Wall\n\nall: main\n\nmain: main.o\n\t$(CC) main.o -o main\n\nmain.o: main.c\n\t$(CC) $(CFLAGS) -c main.c\n\nclean:\n\trm -f *.o main\n",
            ),
        ],
    },
    Language {
        name: "Java",
        gitignore: "*.class\n*.jar\n*.war\n*.ear\nbuild/\nout/\ntarget/\n",
        files: &[(
            "src/Main.java",
            "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}\n",
        )],
    },
    Language {
        name: "JavaScript",
        gitignore: "node_modules/\n*.log\ndist/\nbuild/\ncoverage/\n",
        files: &[
            (
                "package.json",
                "{\n    \"name\": \"project\",\n    \"version\": \"1.0.0\",\n    \"main\": \"index.js\",\n    \"scripts\": {\n        \"start\": \"node index.js\"\n    }\n}\n",
            ),
            ("index.js", "console.log('Hello, World!');\n"),
        ],
    },
];

/// Look up a bundled language, ignoring case.
pub fn find(name: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|lang| lang.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(find("python").map(|l| l.name), Some("Python"));
        assert_eq!(find(" JAVASCRIPT ").map(|l| l.name), Some("JavaScript"));
        assert!(find("Cobol").is_none());
    }

    #[test]
    fn test_templates_end_with_newline() {
        for lang in LANGUAGES {
            assert!(lang.gitignore.ends_with('\n'), "{}", lang.name);
            for (path, content) in lang.files {
                assert!(content.ends_with('\n'), "{} {}", lang.name, path);
            }
        }
    }
}
