/// Shown when neither `url` nor `base64` is given. Rendered through the same
/// Markdown renderer as any document.
pub const WELCOME_MARKDOWN: &str = r#"# Markdown Viewer

Render a Markdown document by pointing this page at it.

| Parameter | Example | Effect |
|---|---|---|
| `url` | `?url=https://raw.githubusercontent.com/user/repo/main/README.md` | Fetch the document; relative links and images resolve against its directory |
| `base64` | `?base64=IyBIZWxsbw` | Decode an inline document (standard or URL-safe alphabet, padding optional) |
| `title` | `?title=My%20Notes` | Override the page title |

`url` wins when both `url` and `base64` are present. Remote servers must allow
cross-origin requests; when they do not, use a CORS-enabled mirror or the
`base64` parameter.

You can also open a local `.md`, `.markdown` or `.txt` file below.

---

# Markdown 查看器

通过 URL 参数指定要渲染的 Markdown 文档。

| 参数 | 示例 | 作用 |
|---|---|---|
| `url` | `?url=https://raw.githubusercontent.com/user/repo/main/README.md` | 获取远程文档，相对链接和图片按其所在目录解析 |
| `base64` | `?base64=IyBIZWxsbw` | 解码内嵌文档（支持标准与 URL 安全字母表，可省略填充） |
| `title` | `?title=%E6%88%91%E7%9A%84%E7%AC%94%E8%AE%B0` | 指定页面标题 |

同时提供 `url` 和 `base64` 时以 `url` 为准。远程服务器需要允许跨域请求；
否则请使用支持 CORS 的镜像，或改用 `base64` 参数。

也可以在下方选择本地的 `.md`、`.markdown` 或 `.txt` 文件。
"#;
